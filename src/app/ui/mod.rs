mod controls;
mod panels;
mod tooltip;
