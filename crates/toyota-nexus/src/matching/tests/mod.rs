mod affinity;
mod common;
mod scoring;
