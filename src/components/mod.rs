pub mod gapminder;
pub mod header;
