pub mod codecs;
pub mod compressor;
pub mod config;
pub mod encoder;
pub mod error;
pub mod extensions;
pub mod ffmpeg;
pub mod filescanner;
pub mod fstools;
pub mod job;
pub mod logging;
pub mod outcome;
pub mod probe;
pub mod reporter;
pub mod resolver;
pub mod size;
pub mod tool;

#[cfg(test)]
mod testing;
