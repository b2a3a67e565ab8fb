use tabfunc::function::arraytabulatedfunction::ArrayTabulatedFunction;
use tabfunc::function::decorator::stricttabulatedfunction::StrictTabulatedFunction;
use tabfunc::function::decorator::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use tabfunc::function::decorator::unmodifiabletabulatedfunction::UnmodifiableTabulatedFunction;
use tabfunc::function::factory::linkedlisttabulatedfunctionfactory::LinkedListTabulatedFunctionFactory;
use tabfunc::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use tabfunc::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfunc::function::tabulatedfunction::{
    Insertable,
    MutableTabulatedFunction,
    TabulatedFunction
};
use tabfunc::function::tabulatedfunctionerror::TabulatedFunctionError;

fn base() -> ArrayTabulatedFunction {
    ArrayTabulatedFunction::from_slices(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap()
}

fn assert_locked_down<T>(table: &mut T)
    where T: MutableTabulatedFunction {
    assert_eq!(table.apply(1.5), Err(TabulatedFunctionError::InterpolationForbidden { x: 1.5 }));
    assert!(matches!(table.apply(0.0), Err(TabulatedFunctionError::InterpolationForbidden { .. })));
    assert!(matches!(table.apply(4.0), Err(TabulatedFunctionError::InterpolationForbidden { .. })));
    assert_eq!(table.apply(2.0), Ok(20.0));
    assert_eq!(table.set_y(0, 999.0), Err(TabulatedFunctionError::ModificationForbidden));
    assert_eq!(table.insert(1.5, 0.0), Err(TabulatedFunctionError::ModificationForbidden));
    assert_eq!(table.remove(0), Err(TabulatedFunctionError::ModificationForbidden));
    assert_eq!(table.count(), 3);
    assert_eq!(table.y(0), Ok(10.0));
}

#[test]
fn strict_forbids_interpolation_only() {
    let mut strict = StrictTabulatedFunction::new(base());
    assert_eq!(strict.apply(1.5), Err(TabulatedFunctionError::InterpolationForbidden { x: 1.5 }));
    assert_eq!(strict.apply(2.0), Ok(20.0));
    strict.set_y(1, 25.0).unwrap();
    strict.insert(1.5, 15.0).unwrap();
    assert_eq!(strict.apply(1.5), Ok(15.0));
    assert_eq!(strict.apply(2.0), Ok(25.0));
}

#[test]
fn unmodifiable_leaves_the_base_untouched() {
    let mut locked = UnmodifiableTabulatedFunction::new(base());
    assert_eq!(locked.set_y(0, 999.0), Err(TabulatedFunctionError::ModificationForbidden));
    assert_eq!(locked.apply(1.5), Ok(15.0));
    assert_eq!(locked.into_inner().y(0), Ok(10.0));
}

#[test]
fn composition_order_does_not_matter() {
    let mut strict_outer = StrictTabulatedFunction::new(UnmodifiableTabulatedFunction::new(base()));
    let mut unmodifiable_outer = UnmodifiableTabulatedFunction::new(StrictTabulatedFunction::new(base()));
    assert_locked_down(&mut strict_outer);
    assert_locked_down(&mut unmodifiable_outer);
}

#[test]
fn factory_builds_strict_unmodifiable_tables() {
    let mut table = LinkedListTabulatedFunctionFactory
        .create_strict_unmodifiable(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0])
        .unwrap();
    assert_locked_down(&mut table);
}

#[test]
fn decorators_wrap_a_borrowed_table() {
    let mut owned = LinkedListTabulatedFunction::from_slices(&[1.0, 2.0], &[1.0, 4.0]).unwrap();
    {
        let mut view = UnmodifiableTabulatedFunction::new(&mut owned);
        assert_eq!(view.set_y(0, 0.0), Err(TabulatedFunctionError::ModificationForbidden));
    }
    owned.set_y(0, 0.0).unwrap();
    assert_eq!(owned.y(0), Ok(0.0));
}

#[test]
fn synchronized_composes_with_the_other_decorators() {
    let shared = SynchronizedTabulatedFunction::new(StrictTabulatedFunction::new(base()));
    assert!(matches!(shared.apply(2.5), Err(TabulatedFunctionError::InterpolationForbidden { .. })));
    shared.set_y(2, 33.0).unwrap();
    assert_eq!(shared.apply(3.0), Ok(33.0));

    let mut strict_outer = StrictTabulatedFunction::new(
        UnmodifiableTabulatedFunction::new(SynchronizedTabulatedFunction::new(base()))
    );
    assert_locked_down(&mut strict_outer);
}

#[test]
fn synchronized_snapshot_isolation() {
    let shared = SynchronizedTabulatedFunction::new(base());
    let snapshot = shared.iter();
    shared.set_y(1, -20.0).unwrap();
    shared.remove(0).unwrap();
    let ys: Vec<f64> = snapshot.map(|pt| pt.y()).collect();
    assert_eq!(ys, vec![10.0, 20.0, 30.0]);
    assert_eq!(shared.count(), 2);
}
