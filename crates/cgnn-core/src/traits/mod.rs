mod skeleton;

pub use skeleton::{EdgeOrder, Skeleton};
