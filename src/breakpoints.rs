//! Named viewport sizes and the media queries derived from them.

/// Viewport breakpoints, widest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breakpoint {
	/// 80rem.
	Xl,
	/// 64rem.
	Lg,
	/// 48rem.
	Md,
	/// 32rem.
	Sm,
}

impl Breakpoint {
	/// Every breakpoint, widest first.
	pub const ALL: [Breakpoint; 4] = [Self::Xl, Self::Lg, Self::Md, Self::Sm];

	/// Short name used as the query key prefix.
	pub fn label(self) -> &'static str {
		match self {
			Self::Xl => "xl",
			Self::Lg => "lg",
			Self::Md => "md",
			Self::Sm => "sm",
		}
	}

	/// Width in rem.
	pub fn rem(self) -> u32 {
		match self {
			Self::Xl => 80,
			Self::Lg => 64,
			Self::Md => 48,
			Self::Sm => 32,
		}
	}

	/// Matches viewports strictly wider than this breakpoint.
	pub fn min_query(self) -> String {
		format!("@media (min-width: {}rem)", self.rem() as f64 + 0.0625)
	}

	/// Matches viewports up to and including this breakpoint.
	pub fn max_query(self) -> String {
		format!("@media (max-width: {}rem)", self.rem())
	}
}

/// Lookup table keyed `xlMin`, `xlMax`, `lgMin`, and so on.
pub fn media_table() -> Vec<(String, String)> {
	Breakpoint::ALL
		.iter()
		.flat_map(|b| {
			[
				(format!("{}Min", b.label()), b.min_query()),
				(format!("{}Max", b.label()), b.max_query()),
			]
		})
		.collect()
}
