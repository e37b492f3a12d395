pub mod numerical;
pub mod scale;
pub mod similarity;
pub mod systems;
