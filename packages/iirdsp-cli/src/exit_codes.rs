pub const SUCCESS: i32 = 0;
pub const EXECUTION_ERROR: i32 = 1;
pub const INPUT_ERROR: i32 = 2;
/// Filter parameters rejected by the designer
pub const DESIGN_ERROR: i32 = 3;
/// Batch run where some files failed
pub const PARTIAL_FAILURE: i32 = 4;
