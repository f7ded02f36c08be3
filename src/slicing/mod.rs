pub mod groups;
pub mod ratios;

pub use groups::group_slices;
pub use ratios::split_n_by_ratios;
