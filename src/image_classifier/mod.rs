pub mod impl_fake;
#[cfg(test)]
pub mod impl_scripted;
pub mod interface;
