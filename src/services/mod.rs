pub mod screen_service;
