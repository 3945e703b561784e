#[cfg(test)]
mod support;
#[cfg(test)]
mod sync;
