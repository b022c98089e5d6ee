/// Current state file format.
pub const STATE_VERSION: u32 = 1;
