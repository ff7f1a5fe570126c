use std::sync::OnceLock;

use hashbrown::HashMap;

/// The table of retained external functions.
///
/// Entries are added with the [`retain!(...)`](crate::retain) macro and
/// assembled into a single slice by the linker. Because the slice lives in a
/// section the linker is told to keep, every function an entry refers to
/// survives dead-code elimination, even when nothing else in the binary calls
/// it.
#[linkme::distributed_slice]
pub static RETAINED: [RetainedSymbol] = [..];

/// A reference to an external function that must survive linking.
///
/// You should never need to construct this manually; use
/// [`retain!(...)`](crate::retain).
pub struct RetainedSymbol {
    name: &'static str,
    // Note: Casting a function item to a raw pointer is not allowed in the
    // initializer of a `static`, so the cast happens in a tiny trampoline.
    // The trampoline is itself part of the retained section, which is what
    // keeps the target referenced.
    address: fn() -> *const (),
}

impl RetainedSymbol {
    #[inline(always)]
    #[must_use]
    #[doc(hidden)]
    pub const fn new(name: &'static str, address: fn() -> *const ()) -> Self {
        Self { name, address }
    }

    /// The linker-visible name of the function.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The address the function was linked at.
    #[inline]
    #[must_use]
    pub fn address(&self) -> *const () {
        (self.address)()
    }

    /// Whether the function was linked at a non-null address.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.address().is_null()
    }
}

impl core::fmt::Debug for RetainedSymbol {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RetainedSymbol")
            .field("name", &self.name)
            .field("address", &self.address())
            .finish()
    }
}

/// Register external functions in the retained table.
///
/// Each argument is a path to an `extern "C"` function item. The macro
/// records the last path segment as the symbol name.
///
/// ```rust,ignore
/// easydict_preload::retain!(zstd_sys::ZSTD_createDCtx, zstd_sys::ZSTD_freeDCtx);
/// ```
#[macro_export]
macro_rules! retain {
    ($($($seg:ident)::+),+ $(,)?) => {
        $(
            $crate::retain!(@impl $($seg)::+);
        )+
    };
    (@impl $($seg:ident)::+) => {
        const _: () = {
            #[$crate::internal::linkme::distributed_slice($crate::RETAINED)]
            #[linkme(crate = $crate::internal::linkme)]
            static ENTRY: $crate::RetainedSymbol = $crate::RetainedSymbol::new(
                $crate::retain!(@name $($seg)::+),
                || $($seg)::+ as *const (),
            );
        };
    };
    (@name $last:ident) => {
        stringify!($last)
    };
    (@name $first:ident :: $($rest:ident)::+) => {
        $crate::retain!(@name $($rest)::+)
    };
}

/// All retained functions, in link order.
#[inline]
#[must_use]
pub fn retained() -> &'static [RetainedSymbol] {
    &RETAINED
}

/// Look up a retained function by its symbol name.
pub fn address_of(name: &str) -> Option<*const ()> {
    static INDEX: OnceLock<HashMap<&'static str, &'static RetainedSymbol>> = OnceLock::new();
    let index = INDEX.get_or_init(|| {
        RETAINED
            .iter()
            .map(|symbol| (symbol.name(), symbol))
            .collect()
    });
    index.get(name).map(|symbol| symbol.address())
}

/// Summary of the retained table, used as a capability check at attach.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RetentionReport {
    /// Number of entries in the table.
    pub total: usize,
    /// Names of entries that were linked at a null address.
    pub null: Vec<&'static str>,
}

impl RetentionReport {
    #[inline]
    #[must_use]
    pub fn all_resolved(&self) -> bool {
        self.null.is_empty()
    }
}

/// Walk the retained table and report which entries are null.
#[must_use]
pub fn check() -> RetentionReport {
    RetentionReport {
        total: RETAINED.len(),
        null: RETAINED
            .iter()
            .filter(|symbol| !symbol.is_resolved())
            .map(RetainedSymbol::name)
            .collect(),
    }
}
