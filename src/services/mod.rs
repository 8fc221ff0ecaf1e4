pub mod ladder;
pub mod server;

pub use ladder::LadderService;
pub use server::ServerService;
