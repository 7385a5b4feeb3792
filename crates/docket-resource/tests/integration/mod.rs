mod collection;
mod destroy;
mod ownership;
mod policy;
mod secrets;
mod writes;
