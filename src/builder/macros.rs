//! Macros for ergonomic state machine construction.

/// Generate a `State` implementation for a fieldless enum.
///
/// Also generates an `all()` constructor listing every variant in
/// declaration order, ready to hand to a machine.
///
/// # Example
///
/// ```
/// use aios_core::{state_enum, StateMachine};
///
/// state_enum! {
///     pub enum CrewState {
///         Planning,
///         Executing,
///         Monitoring,
///     }
/// }
///
/// let mut machine = StateMachine::new(CrewState::all()).unwrap();
/// machine.transition(CrewState::Executing).unwrap();
/// assert_eq!(machine.current(), &CrewState::Executing);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis fn all() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),*]
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Idle,
            Working,
            Done,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Working.name(), "Working");
        assert_eq!(TestState::Done.name(), "Done");
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(
            TestState::all(),
            vec![TestState::Idle, TestState::Working, TestState::Done]
        );
    }

    #[test]
    fn state_enum_supports_visibility_and_attributes() {
        state_enum! {
            /// Documented enum.
            pub enum PublicState {
                A,
                #[serde(rename = "bee")]
                B,
            }
        }

        assert_eq!(PublicState::all().len(), 2);
        assert_eq!(serde_json::to_string(&PublicState::B).unwrap(), "\"bee\"");
    }
}
