mod service;
mod transcript;
