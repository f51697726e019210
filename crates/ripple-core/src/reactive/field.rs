//! State-shape declaration layer.
//!
//! A store's field set is fixed at compile time: [`observable_state!`]
//! expands one struct declaration into the state type, a companion struct
//! of typed [`Selector`](super::Selector)s, a companion struct of typed
//! [`Setter`](super::Setter)s, and the [`ObservableState`] impl wiring
//! them together. Both companions are generated from the same field list,
//! so a field cannot have a selector without a setter or vice versa.

use super::container::StateContainer;

/// A state type with declared observable fields.
///
/// Implemented by [`observable_state!`](crate::observable_state) rather
/// than by hand. The associated types are the generated per-field
/// collections; `FIELDS` lists the declared names in declaration order,
/// for diagnostics and tests.
pub trait ObservableState: Clone + PartialEq + Send + Sized + 'static {
    /// Generated struct holding one `Selector` per declared field.
    type Selectors;
    /// Generated struct holding one `Setter` per declared field.
    type Setters;

    /// Declared field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Synthesize the selector collection against `container`.
    fn selectors(container: &StateContainer<Self>) -> Self::Selectors;

    /// Synthesize the setter collection against `container`.
    fn setters(container: &StateContainer<Self>) -> Self::Setters;
}

/// Declare an observable state shape.
///
/// Takes a struct declaration plus names for the two generated companion
/// structs, and expands to:
///
/// - the state struct, deriving `Clone`, `Debug`, and `PartialEq`
///   (structural equality is what selector dedup runs on);
/// - a selectors struct with one typed [`Selector`](crate::Selector) field
///   per state field;
/// - a setters struct with one typed [`Setter`](crate::Setter) field per
///   state field;
/// - an [`ObservableState`] impl carrying `FIELDS` and the two synthesis
///   constructors.
///
/// Every field type must be `Clone + PartialEq + Send + 'static`.
///
/// ```rust,ignore
/// observable_state! {
///     /// UI state for the transfer panel.
///     pub struct TransferState {
///         pub progress: u8,
///         pub destination: String,
///     }
///     selectors: pub struct TransferSelectors;
///     setters: pub struct TransferSetters;
/// }
/// ```
#[macro_export]
macro_rules! observable_state {
    (
        $(#[$meta:meta])*
        $vis:vis struct $state:ident {
            $( $(#[$field_meta:meta])* $field_vis:vis $field:ident : $field_ty:ty ),+ $(,)?
        }
        selectors: $sel_vis:vis struct $selectors:ident;
        setters: $set_vis:vis struct $setters:ident;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis struct $state {
            $( $(#[$field_meta])* $field_vis $field : $field_ty, )+
        }

        #[doc = concat!("Per-field selector streams derived from [`", stringify!($state), "`].")]
        $sel_vis struct $selectors {
            $(
                #[doc = concat!("Deduplicated stream of `", stringify!($field), "` values.")]
                $field_vis $field : $crate::reactive::Selector<$state, $field_ty>,
            )+
        }

        #[doc = concat!("Per-field update functions derived from [`", stringify!($state), "`].")]
        $set_vis struct $setters {
            $(
                #[doc = concat!("Copy-on-write writer for `", stringify!($field), "`.")]
                $field_vis $field : $crate::reactive::Setter<$state, $field_ty>,
            )+
        }

        impl $crate::reactive::ObservableState for $state {
            type Selectors = $selectors;
            type Setters = $setters;

            const FIELDS: &'static [&'static str] = &[ $( stringify!($field) ),+ ];

            fn selectors(
                container: &$crate::reactive::StateContainer<Self>,
            ) -> Self::Selectors {
                $selectors {
                    $(
                        $field: $crate::reactive::Selector::new(
                            container,
                            stringify!($field),
                            |state: &Self| state.$field.clone(),
                        ),
                    )+
                }
            }

            fn setters(
                container: &$crate::reactive::StateContainer<Self>,
            ) -> Self::Setters {
                $setters {
                    $(
                        $field: $crate::reactive::Setter::new(
                            container,
                            stringify!($field),
                            |state: &mut Self, value: $field_ty| state.$field = value,
                        ),
                    )+
                }
            }
        }
    };
}
