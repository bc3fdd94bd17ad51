mod helpers;
mod repository;
mod request_log;
mod service;
