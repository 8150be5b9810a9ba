use std::fmt::Debug;

use crate::*;

/// Interface of channels.
///
/// An interface is a type-level description only: it names the value flowing forward (producer to consumer) and
/// the value flowing backward (consumer to producer) in every step.
pub trait Interface: 'static + Sized + Debug {
    /// Forward value.
    type Fwd: Signal;

    /// Backward value.
    type Bwd: Signal;
}

/// Forward value of an interface.
pub type Fwd<I> = <I as Interface>::Fwd;

/// Backward value of an interface.
pub type Bwd<I> = <I as Interface>::Bwd;

impl Interface for () {
    type Bwd = ();
    type Fwd = ();
}

macro_rules! impl_interface_tuple {
    ($($a:ident)+) => {
        impl<$($a: Interface,)+> Interface for ($($a,)+) {
            type Bwd = ($($a::Bwd,)+);
            type Fwd = ($($a::Fwd,)+);
        }
    }
}

impl_interface_tuple! { I1 I2 }
impl_interface_tuple! { I1 I2 I3 }
impl_interface_tuple! { I1 I2 I3 I4 }

impl<I: Interface, const N: usize> Interface for [I; N] {
    type Bwd = Array<I::Bwd, N>;
    type Fwd = Array<I::Fwd, N>;
}

/// Macro for declaring custom channel.
///
/// ```ignore
/// channel! {DeqChannel<V: Signal>, V, Deque}
/// ```
#[macro_export]
macro_rules! channel {
    (
        $(#[$meta:meta])*
        $channel_name: ident,
        $fwd: ty,
        $bwd: ty
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $channel_name {
            _private: (),
        }

        impl $crate::Interface for $channel_name {
            type Bwd = $bwd;
            type Fwd = $fwd;
        }
    };
    (
        $(#[$meta:meta])*
        $channel_name: ident <$value_generic:ident: Signal>,
        $fwd: ty,
        $bwd: ty
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $channel_name<$value_generic: $crate::Signal> {
            _marker: ::std::marker::PhantomData<$value_generic>,
        }

        impl<$value_generic: $crate::Signal> $crate::Interface for $channel_name<$value_generic> {
            type Bwd = $bwd;
            type Fwd = $fwd;
        }
    };
}
