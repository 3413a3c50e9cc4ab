use std::collections::BTreeSet;

/// Categories hidden through the legend.
///
/// Hiding every category is never a state this can be in: the toggle that
/// would complete the set clears it instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
	known: BTreeSet<String>,
	excluded: BTreeSet<String>,
}

impl FilterState {
	pub fn new(categories: &[String]) -> Self {
		Self {
			known: categories.iter().cloned().collect(),
			excluded: BTreeSet::new(),
		}
	}

	/// Flip a category's visibility. Unknown categories are ignored.
	pub fn toggle(&mut self, category: &str) {
		if !self.known.contains(category) {
			return;
		}
		if !self.excluded.remove(category) {
			self.excluded.insert(category.to_owned());
		}
		if self.excluded.len() >= self.known.len() {
			self.excluded.clear();
		}
	}

	pub fn is_visible(&self, category: &str) -> bool {
		!self.excluded.contains(category)
	}

	pub fn reset(&mut self) {
		self.excluded.clear();
	}

	pub fn excluded(&self) -> &BTreeSet<String> {
		&self.excluded
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn filter(categories: &[&str]) -> FilterState {
		let owned: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
		FilterState::new(&owned)
	}

	#[test]
	fn toggling_twice_restores_the_previous_set() {
		let mut f = filter(&["asia", "europe", "africa"]);
		f.toggle("asia");
		let before = f.clone();
		f.toggle("europe");
		f.toggle("europe");
		assert_eq!(f, before);
		assert!(!f.is_visible("asia"));
		assert!(f.is_visible("europe"));
	}

	#[test]
	fn hiding_every_category_resets_the_filter() {
		let mut f = filter(&["cont1", "cont2"]);
		f.toggle("cont1");
		assert_eq!(f.excluded().len(), 1);
		f.toggle("cont2");
		assert!(f.excluded().is_empty());
		assert!(f.is_visible("cont1") && f.is_visible("cont2"));
	}

	#[test]
	fn excluded_set_stays_smaller_than_the_category_count() {
		let categories = ["a", "b", "c", "d"];
		let mut f = filter(&categories);
		for step in 0..20 {
			f.toggle(categories[(step * 3) % categories.len()]);
			assert!(f.excluded().len() < categories.len());
		}
	}

	#[test]
	fn unknown_categories_and_reset() {
		let mut f = filter(&["a", "b"]);
		f.toggle("zzz");
		assert!(f.excluded().is_empty());
		f.toggle("a");
		f.reset();
		assert!(f.is_visible("a"));
	}
}
