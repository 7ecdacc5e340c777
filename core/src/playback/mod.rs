mod queue;

pub use queue::CuePlaybackQueue;
