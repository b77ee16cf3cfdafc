pub mod collection;
pub mod dom;
pub mod events;
pub mod form;
pub mod render;
pub mod transport;
pub mod view;
