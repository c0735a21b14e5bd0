mod document;
mod render;
