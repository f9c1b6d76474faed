mod api;
mod clipboard;
mod components;
mod config;
mod controller;
mod dom;
mod model;
mod state;

fn main() {
    yew::Renderer::<components::App>::new().render();
}
