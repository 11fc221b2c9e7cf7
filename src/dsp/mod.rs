//! DSP: pull-based stereo signal stages and the live graph around them.
//!
//! Every stage implements [`stream::Streamer`] and wraps the stage before
//! it. [`composite::build_graph`] assembles a whole graph from a parameter
//! snapshot; [`engine::DynamicStreamer`] rebuilds and hot-swaps it as
//! parameters change.

pub mod composite;
pub mod effect_chain;
pub mod effect_loop;
pub mod engine;
pub mod envelope;
pub mod mixer;
pub mod oscillator;
pub mod sample_rate;
pub mod stages;
pub mod stream;
pub mod transition;
pub mod tremolo;
pub mod voice;
