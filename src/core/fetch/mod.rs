mod batch;
mod orchestrator;

pub use batch::{BatchSlot, FetchFailure, FetchPhase, FetchedMetadata};
pub use orchestrator::{
    folder_type_for, member_type_for_folder, FetchOrchestrator, DEFAULT_CONCURRENCY,
};
