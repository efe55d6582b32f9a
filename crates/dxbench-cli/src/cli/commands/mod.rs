mod dispatch;
mod enrich;
mod run;
mod summarize;

pub use dispatch::dispatch;
