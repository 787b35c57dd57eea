pub mod bidirectional;
pub mod one_way;

pub use bidirectional::Bidirectional;
pub use one_way::OneWay;
