mod buffer;
mod handle;
