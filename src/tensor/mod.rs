mod local_input;
mod local_weight;
mod local_output;

pub use local_input::LocalInput;
pub use local_weight::LocalWeight;
pub use local_output::LocalOutput;
