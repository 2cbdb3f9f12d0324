use fixed_function::{Error, FixedSizeFunction, Null};
use proptest::prelude::*;

type Function = FixedSizeFunction<dyn FnMut(i64) -> i64, 32>;

#[derive(Debug, Clone)]
enum Callable {
    Empty,
    Add(i64),
    Mul(i64),
    Accumulate(i64),
}

impl Callable {
    fn build(&self) -> Function {
        match *self {
            Callable::Empty => Function::new_empty(),
            Callable::Add(k) => Function::new(move |x: i64| x.wrapping_add(k)),
            Callable::Mul(k) => Function::new(move |x: i64| x.wrapping_mul(k)),
            Callable::Accumulate(start) => {
                let mut total = start;
                Function::new(move |x: i64| {
                    total = total.wrapping_add(x);
                    total
                })
            }
        }
    }

    /// Expected results of calling a freshly built function with `inputs`, in order.
    fn expected(&self, inputs: &[i64]) -> Vec<Result<i64, Error>> {
        let mut total = match *self {
            Callable::Accumulate(start) => start,
            _ => 0,
        };

        inputs
            .iter()
            .map(|&x| match *self {
                Callable::Empty => Err(Error::InvalidInvocation),
                Callable::Add(k) => Ok(x.wrapping_add(k)),
                Callable::Mul(k) => Ok(x.wrapping_mul(k)),
                Callable::Accumulate(_) => {
                    total = total.wrapping_add(x);
                    Ok(total)
                }
            })
            .collect()
    }
}

fn callable() -> impl Strategy<Value = Callable> {
    prop_oneof![
        Just(Callable::Empty),
        any::<i64>().prop_map(Callable::Add),
        any::<i64>().prop_map(Callable::Mul),
        any::<i64>().prop_map(Callable::Accumulate),
    ]
}

fn run(f: &mut Function, inputs: &[i64]) -> Vec<Result<i64, Error>> {
    inputs.iter().map(|&x| f.call(x)).collect()
}

proptest! {
    #[test]
    fn calls_match_the_callable(c in callable(), inputs in proptest::collection::vec(any::<i64>(), 0..16)) {
        let mut f = c.build();
        prop_assert_eq!(run(&mut f, &inputs), c.expected(&inputs));
    }

    #[test]
    fn double_swap_restores(a in callable(), b in callable(), inputs in proptest::collection::vec(any::<i64>(), 0..8)) {
        let mut fa = a.build();
        let mut fb = b.build();

        fa.swap(&mut fb);
        prop_assert_eq!(fa.is_some(), !matches!(b, Callable::Empty));
        prop_assert_eq!(fb.is_some(), !matches!(a, Callable::Empty));

        fa.swap(&mut fb);
        prop_assert_eq!(run(&mut fa, &inputs), a.expected(&inputs));
        prop_assert_eq!(run(&mut fb, &inputs), b.expected(&inputs));
    }

    #[test]
    fn copies_are_independent(c in callable(), first in proptest::collection::vec(any::<i64>(), 0..8), second in proptest::collection::vec(any::<i64>(), 0..8)) {
        let mut original = c.build();
        let mut copy = original.clone();

        // Driving the original must not affect the copy.
        prop_assert_eq!(run(&mut original, &first), c.expected(&first));
        prop_assert_eq!(run(&mut copy, &second), c.expected(&second));
    }

    #[test]
    fn move_empties_source(c in callable(), inputs in proptest::collection::vec(any::<i64>(), 0..8)) {
        let mut source = c.build();
        let mut target = source.take();

        prop_assert!(source == Null);
        prop_assert_eq!(run(&mut target, &inputs), c.expected(&inputs));
    }

    #[test]
    fn reset_matches_null_assignment(c in callable()) {
        let mut a = c.build();
        let mut b = c.build();
        prop_assert_eq!(a.is_some(), b.is_some());

        a.reset();
        b = Null.into();

        prop_assert!(a == Null);
        prop_assert!(b == Null);
        prop_assert_eq!(a.call(1), Err(Error::InvalidInvocation));
        prop_assert_eq!(b.call(1), Err(Error::InvalidInvocation));
    }
}
