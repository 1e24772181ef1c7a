//! Generators for per-entity override and clear sets.

/// Define an override set: one `Override<T>` per field, all `Unchanged` by
/// default, with a chainable setter named after each field.
macro_rules! overrides {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $crate::adapter::Override<$ty>, )*
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $field(mut self, value: $ty) -> Self {
                    self.$field = $crate::adapter::Override::Set(value);
                    self
                }
            )*

            /// `true` when no field is overridden.
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_unchanged() )*
            }
        }
    };
}

/// Define a clear set: one flag per clearable field, all unset by default.
macro_rules! clears {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name {
            $( pub $field: bool, )*
        }

        impl $name {
            /// Names accepted by [`Self::set_by_name`].
            pub const FIELDS: &'static [&'static str] = &[$( stringify!($field) ),*];

            pub fn new() -> Self {
                Self::default()
            }

            /// Every clearable field flagged.
            pub fn all() -> Self {
                Self { $( $field: true, )* }
            }

            $(
                pub fn $field(mut self) -> Self {
                    self.$field = true;
                    self
                }
            )*

            /// Flag a field by its name. Returns `false` for an unknown name.
            pub fn set_by_name(&mut self, field: &str) -> bool {
                match field {
                    $( stringify!($field) => {
                        self.$field = true;
                        true
                    } )*
                    _ => false,
                }
            }

            /// `true` when no field is flagged.
            pub fn is_empty(&self) -> bool {
                true $( && !self.$field )*
            }
        }
    };
}
