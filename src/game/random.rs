use rand::{thread_rng, Rng};

use crate::error::Error;

/// Picks one element of `items` with the same probability for every index.
pub fn get_random_item<T>(items: &[T]) -> Result<&T, Error> {
    get_random_item_with(items, &mut thread_rng())
}

pub fn get_random_item_with<'a, T, R>(items: &'a [T], rng: &mut R) -> Result<&'a T, Error>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Err(Error::InvalidArgument(
            "Cannot pick a random item from an empty list.".to_string(),
        ));
    }
    Ok(&items[rng.gen_range(0..items.len())])
}
