use pretty_assertions::Comparison;
use std::any::type_name;
use std::fmt::Debug;

/// Structural equality oracle. Returns an empty string when `want` and `got`
/// are equal, otherwise a description of how they differ.
///
/// Values of different types are never equal, even when `PartialEq` between
/// them exists: a `Vec<i32>` and an `[i32; 2]` holding the same elements
/// differ. Types are compared by name with lifetimes erased, so borrowed
/// data compares like owned data.
pub fn diff<W, G>(want: &W, got: &G) -> String
where
    W: ?Sized + PartialEq<G> + Debug,
    G: ?Sized + Debug,
{
    if type_name::<W>() != type_name::<G>() {
        format!(
            "type mismatch: want `{}`, got `{}`\n{}",
            type_name::<W>(),
            type_name::<G>(),
            Comparison::new(want, got)
        )
    } else if want == got {
        String::new()
    } else {
        format!("diff < want / got >:\n{}", Comparison::new(want, got))
    }
}

/// Whether the oracle considers `want` and `got` equal.
pub fn equivalent<W, G>(want: &W, got: &G) -> bool
where
    W: ?Sized + PartialEq<G> + Debug,
    G: ?Sized + Debug,
{
    diff(want, got).is_empty()
}
