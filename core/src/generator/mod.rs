use crate::*;
pub use shuffle::*;

mod shuffle;

pub trait GridGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid>;
}
