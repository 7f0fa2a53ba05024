mod menu;
mod profile;
mod quiz;
pub(crate) mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use menu::MenuView;
pub use profile::ProfileView;
pub use quiz::QuizView;
