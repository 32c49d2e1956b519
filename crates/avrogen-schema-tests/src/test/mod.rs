pub mod shapes;

#[cfg(test)]
mod interop;
