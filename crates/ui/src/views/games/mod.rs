mod library;
mod play;
mod shell;

pub use library::GameLibraryView;
pub use play::GamePlayView;
pub use shell::GameShell;
