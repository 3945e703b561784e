mod integration;
mod reload;
