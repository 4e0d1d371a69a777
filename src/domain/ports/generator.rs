//! Generator port - UI descriptor to source compiler (`pyuic5`)

use std::path::Path;

use crate::domain::value_objects::ToolStatus;
use crate::error::StampResult;

pub trait Generator {
    /// Compile `descriptor` into `output`, overwriting it
    fn generate(&self, descriptor: &Path, output: &Path) -> StampResult<ToolStatus>;
}
