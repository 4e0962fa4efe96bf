mod canvas;
mod controls;
mod overlay;
