mod common;
mod denial;
mod service;
