pub mod state;
pub mod panels;
pub mod theme;

#[cfg(test)]
mod tests;
