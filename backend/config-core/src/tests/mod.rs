mod idle_timer;
mod server;
