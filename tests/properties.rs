use tabfunc::function::factory::arraytabulatedfunctionfactory::ArrayTabulatedFunctionFactory;
use tabfunc::function::factory::linkedlisttabulatedfunctionfactory::LinkedListTabulatedFunctionFactory;
use tabfunc::function::factory::tabulatedfunctionfactory::{
    BackendKind,
    TabulatedFunctionFactory
};
use tabfunc::function::point::Point;
use tabfunc::function::tabulatedfunction::{
    Insertable,
    Removable,
    TabulatedFunction
};
use tabfunc::io::pointsequence::PointSequence;
use tabfunc::operator::tabulateddifferentialoperator::TabulatedDifferentialOperator;

const EPS: f64 = 1e-10;

fn assert_sorted<T>(table: &T)
    where T: TabulatedFunction + ?Sized {
    let xs: Vec<f64> = table.iter().map(|pt| pt.x()).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]), "x not strictly increasing: {:?}", xs);
}

fn check_backend<F>(factory: F)
    where F: TabulatedFunctionFactory {
    // 兩點內插
    let line = factory.create(&[0.0, 2.0], &[0.0, 2.0]).unwrap();
    assert!((line.apply(1.0).unwrap() - 1.0).abs() < EPS);

    // 兩端外推
    let doubled = factory.create(&[2.0, 4.0], &[4.0, 8.0]).unwrap();
    assert!((doubled.apply(1.0).unwrap() - 2.0).abs() < EPS);
    assert!((doubled.apply(5.0).unwrap() - 10.0).abs() < EPS);

    // 精確命中優先
    let table = factory.create(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap();
    assert_eq!(table.apply(2.0), Ok(20.0));
    assert_eq!(table.apply(3.0), Ok(30.0));
    assert_eq!(table.apply(1.0), Ok(10.0));

    // 插入維持排序
    let mut table = table;
    table.insert(1.5, 99.0).unwrap();
    assert_eq!(table.count(), 4);
    assert_eq!(table.points(), vec![
        Point::new(1.0, 10.0),
        Point::new(1.5, 99.0),
        Point::new(2.0, 20.0),
        Point::new(3.0, 30.0)
    ]);
    assert_sorted(&table);

    table.insert(0.0, -1.0).unwrap();
    table.insert(4.0, 40.0).unwrap();
    table.insert(2.0, 21.0).unwrap();
    assert_eq!(table.count(), 6);
    assert_eq!(table.y(3), Ok(21.0));
    assert_sorted(&table);

    table.remove(0).unwrap();
    table.remove(table.count() - 1).unwrap();
    assert_eq!(table.left_bound(), Ok(1.0));
    assert_eq!(table.right_bound(), Ok(3.0));
    assert_sorted(&table);
}

#[test]
fn array_backend_properties() {
    check_backend(ArrayTabulatedFunctionFactory);
}

#[test]
fn linked_list_backend_properties() {
    check_backend(LinkedListTabulatedFunctionFactory);
}

#[test]
fn runtime_backend_properties() {
    check_backend(BackendKind::Array);
    check_backend(BackendKind::LinkedList);
}

#[test]
fn export_and_rebuild_reproduces_the_table() {
    let source = LinkedListTabulatedFunctionFactory
        .create_from_function(&|x: f64| x.cos(), -1.0, 1.0, 33)
        .unwrap();
    let sequence = PointSequence::from_function(&source);
    let rebuilt = sequence.into_function(&ArrayTabulatedFunctionFactory).unwrap();
    assert_eq!(rebuilt.count(), source.count());
    for (lhs, rhs) in rebuilt.iter().zip(source.iter()) {
        assert!((lhs.x() - rhs.x()).abs() < EPS);
        assert!((lhs.y() - rhs.y()).abs() < EPS);
    }
}

#[test]
fn derivative_of_square_at_interior_points() {
    let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
    let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
    for backend in [BackendKind::Array, BackendKind::LinkedList] {
        let table = backend.create(&xs, &ys).unwrap();
        let derived = TabulatedDifferentialOperator::new(backend).derive(&table).unwrap();
        assert_eq!(derived.count(), 5);
        assert!((derived.apply(3.0).unwrap() - 6.0).abs() < 0.01);
        for i in 1..4 {
            let x = derived.x(i).unwrap();
            assert!((derived.y(i).unwrap() - 2.0 * x).abs() < 0.01);
        }
    }
}

#[test]
fn invalid_input_is_rejected_by_every_backend() {
    for backend in [BackendKind::Array, BackendKind::LinkedList] {
        assert!(backend.create(&[1.0, 1.0], &[0.0, 0.0]).is_err());
        assert!(backend.create(&[0.0, 1.0], &[0.0]).is_err());
        assert!(backend.create(&[], &[]).is_err());
        assert!(backend.create_from_function(&|x: f64| x, 0.0, 1.0, 1).is_err());
    }
}
