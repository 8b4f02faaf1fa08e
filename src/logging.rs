#![macro_use]
#![allow(unused_macros)]

macro_rules! err {
    ($message:expr) => {
        eprintln!("[E] {}", $message.bold().red())
    };
}

macro_rules! warn {
    ($message:expr) => {
        println!("[W] {}", $message.italic().yellow())
    };
}

macro_rules! info {
    ($message:expr) => {
        println!("[I] {}", $message.italic().white())
    };
}
