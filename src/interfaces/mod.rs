// Interfaces layer: the HTTP surface (auth gate, backend proxy, lead routes).

pub mod http;
