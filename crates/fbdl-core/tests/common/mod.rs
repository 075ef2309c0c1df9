#![allow(dead_code)]

pub mod flipbook_server;
