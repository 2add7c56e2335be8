mod dimension_info;
mod tile_code;
mod tile_code_correct;
mod tile_code_hashed;

pub use dimension_info::DimensionInfo;
pub use tile_code::TileCode;
pub use tile_code_correct::TileCodeCorrect;
pub use tile_code_hashed::{TileCodeHashed, TileHasher};
