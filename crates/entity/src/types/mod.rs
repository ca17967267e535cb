mod talk_link_kind;

pub use talk_link_kind::*;
