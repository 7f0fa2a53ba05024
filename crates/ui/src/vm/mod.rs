mod menu_vm;
mod profile_vm;
mod quiz_vm;

pub use menu_vm::{CompletedPartVm, MenuPartVm, map_completed_parts, map_menu_parts};
pub use profile_vm::{HOUSE_ORDER, HouseBarVm, ProfileFieldVm, ProfileVm, map_profile};
pub use quiz_vm::{OptionVm, QuestionVm, map_question};
