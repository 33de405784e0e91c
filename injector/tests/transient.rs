#[cfg(feature = "derive")]
mod transient_test {
    use injector::component::{self, InjectablePtr};
    use injector::injector::Injector;
    use injector::instance_provider::TypedInstanceProvider;
    use injector::scope::{KeySpaceKind, Lifetime};
    use injector::{BindingKey, Injectable, InjectorError, TypeKey};
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    #[derive(Injectable, Default)]
    struct TestInjectable {
        a: i32,
    }

    trait TestInterface: component::Injectable {
        fn a(&self) -> i32;
    }

    #[derive(Injectable, Default)]
    #[injectable(interfaces(TestInterface))]
    struct TestInjectable2 {
        a: i32,
    }

    impl TestInterface for TestInjectable2 {
        fn a(&self) -> i32 {
            self.a
        }
    }

    #[test]
    fn should_create_independent_instances_without_tag() {
        let mut injector = Injector::new();
        injector.register_transient::<TestInjectable>().unwrap();
        injector.register_transient::<TestInjectable2>().unwrap();

        let mut instances_a: Vec<_> = (0..3)
            .map(|_| injector.resolve_transient::<TestInjectable>().unwrap())
            .collect();
        let mut instances_b: Vec<_> = (0..3)
            .map(|_| injector.resolve_transient::<TestInjectable2>().unwrap())
            .collect();

        for (value, instance) in (1..).zip(instances_a.iter_mut()) {
            instance.a = value;
        }
        for (value, instance) in (4..).zip(instances_b.iter_mut()) {
            instance.a = value;
        }

        assert_eq!(
            instances_a.iter().map(|instance| instance.a).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            instances_b.iter().map(|instance| instance.a()).collect::<Vec<_>>(),
            vec![4, 5, 6]
        );
    }

    #[test]
    fn should_create_independent_instances_with_tag() {
        let mut injector = Injector::new();
        injector.register_tagged_transient::<TestInjectable>("test1").unwrap();
        injector.register_tagged_transient::<TestInjectable>("test2").unwrap();
        injector.register_tagged_transient::<TestInjectable2>("test3").unwrap();

        let mut first = injector
            .resolve_tagged_transient::<TestInjectable>("test1")
            .unwrap();
        let mut second = injector
            .resolve_tagged_transient::<TestInjectable>("test1")
            .unwrap();
        let mut third = injector
            .resolve_tagged_transient::<TestInjectable>("test2")
            .unwrap();
        let mut fourth = injector
            .resolve_tagged_transient::<TestInjectable2>("test3")
            .unwrap();

        first.a = 1;
        second.a = 2;
        third.a = 3;
        fourth.a = 4;

        assert_eq!(first.a, 1);
        assert_eq!(second.a, 2);
        assert_eq!(third.a, 3);
        assert_eq!(fourth.a(), 4);
    }

    #[test]
    fn should_use_factory_without_tag() {
        let mut injector = Injector::new();
        injector
            .register_transient_factory::<TestInjectable, _>(|| Box::new(TestInjectable { a: 1 }))
            .unwrap();
        injector
            .register_transient_factory::<TestInjectable2, _>(|| {
                Box::new(TestInjectable2 { a: 2 })
            })
            .unwrap();

        assert_eq!(injector.resolve_transient::<TestInjectable>().unwrap().a, 1);
        assert_eq!(injector.resolve_transient::<TestInjectable2>().unwrap().a(), 2);
    }

    #[test]
    fn should_use_factory_with_tag() {
        let mut injector = Injector::new();
        for (tag, a) in [("test1", 1), ("test2", 2)] {
            injector
                .register_tagged_transient_factory::<TestInjectable, _>(tag, move || {
                    Box::new(TestInjectable { a })
                })
                .unwrap();
        }
        for (tag, a) in [("test3", 3), ("test4", 4)] {
            injector
                .register_tagged_transient_factory::<TestInjectable2, _>(tag, move || {
                    Box::new(TestInjectable2 { a })
                })
                .unwrap();
        }

        assert_eq!(
            injector
                .resolve_tagged_transient::<TestInjectable>("test1")
                .unwrap()
                .a,
            1
        );
        assert_eq!(
            injector
                .resolve_tagged_transient::<TestInjectable>("test2")
                .unwrap()
                .a,
            2
        );
        assert_eq!(
            injector
                .resolve_tagged_transient::<TestInjectable2>("test3")
                .unwrap()
                .a(),
            3
        );
        assert_eq!(
            injector
                .resolve_tagged_transient::<TestInjectable2>("test4")
                .unwrap()
                .a(),
            4
        );
    }

    #[test]
    fn should_call_stateful_factory_through_interface() {
        let counter = Arc::new(AtomicI32::new(1));

        let mut injector = Injector::new();
        injector
            .register_transient_factory::<dyn TestInterface, _>(move || {
                Box::new(TestInjectable2 {
                    a: counter.fetch_add(1, Ordering::SeqCst),
                })
            })
            .unwrap();

        let values: Vec<_> = (0..3)
            .map(|_| injector.resolve_transient::<dyn TestInterface>().unwrap().a())
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn should_resolve_polymorphic_with_tag() {
        let mut injector = Injector::new();
        for (tag, a) in [("test1", 1), ("test2", 2), ("test3", 3)] {
            injector
                .register_tagged_transient_factory::<dyn TestInterface, _>(tag, move || {
                    Box::new(TestInjectable2 { a })
                })
                .unwrap();
        }

        let values: Vec<_> = ["test1", "test2", "test3"]
            .into_iter()
            .map(|tag| {
                injector
                    .resolve_tagged_transient::<dyn TestInterface>(tag)
                    .unwrap()
                    .a()
            })
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn should_fail_polymorphic_mismatch() {
        let mut injector = Injector::new();
        injector
            .register_transient_factory::<dyn TestInterface, _>(|| {
                Box::new(TestInjectable { a: 1 })
            })
            .unwrap();

        assert_eq!(
            injector.resolve_transient::<dyn TestInterface>().err().unwrap(),
            InjectorError::TypeMismatch {
                lifetime: Lifetime::Transient,
                key: BindingKey::Type(TypeKey::of::<dyn TestInterface>()),
                requested: TypeKey::of::<dyn TestInterface>(),
            }
        );
    }

    #[test]
    fn should_reject_duplicate_registration() {
        let mut injector = Injector::new();
        injector
            .register_transient_factory::<TestInjectable, _>(|| Box::new(TestInjectable { a: 1 }))
            .unwrap();
        injector
            .register_tagged_transient_factory::<dyn TestInterface, _>("test1", || {
                Box::new(TestInjectable2 { a: 1 })
            })
            .unwrap();

        assert_eq!(
            injector
                .register_transient_factory::<TestInjectable, _>(|| {
                    Box::new(TestInjectable { a: 2 })
                })
                .unwrap_err(),
            InjectorError::AlreadyRegistered {
                lifetime: Lifetime::Transient,
                key: BindingKey::Type(TypeKey::of::<TestInjectable>()),
            }
        );
        assert_eq!(
            injector
                .register_tagged_transient_factory::<dyn TestInterface, _>("test1", || {
                    Box::new(TestInjectable2 { a: 2 })
                })
                .unwrap_err(),
            InjectorError::AlreadyRegistered {
                lifetime: Lifetime::Transient,
                key: BindingKey::Tag("test1".to_string()),
            }
        );

        assert_eq!(injector.resolve_transient::<TestInjectable>().unwrap().a, 1);
        assert_eq!(
            injector
                .resolve_tagged_transient::<dyn TestInterface>("test1")
                .unwrap()
                .a(),
            1
        );
    }

    #[test]
    fn should_keep_lifetimes_independent() {
        let mut injector = Injector::new();
        injector.register_singleton::<TestInjectable>().unwrap();
        injector.register_transient::<TestInjectable>().unwrap();
        injector.register_tagged_singleton::<TestInjectable>("test").unwrap();
        injector.register_tagged_transient::<TestInjectable>("test").unwrap();

        for kind in [
            KeySpaceKind::Singleton,
            KeySpaceKind::TaggedSingleton,
            KeySpaceKind::Transient,
            KeySpaceKind::TaggedTransient,
        ] {
            assert_eq!(injector.registered_keys(kind).len(), 1);
        }

        assert!(injector.resolve_transient::<TestInjectable2>().is_err());
    }

    #[test]
    fn should_forward_multiple_arguments() {
        let mut injector = Injector::new();
        injector
            .register_transient_factory_with::<TestInjectable, (i32, i32), _>(|(a, b)| {
                Box::new(TestInjectable { a: a + b })
            })
            .unwrap();
        injector
            .register_tagged_transient_factory_with::<dyn TestInterface, i32, _>("test", |a| {
                Box::new(TestInjectable2 { a }) as InjectablePtr
            })
            .unwrap();

        assert_eq!(
            injector
                .resolve_transient_with::<TestInjectable, _>((2, 3))
                .unwrap()
                .a,
            5
        );
        assert_eq!(
            injector
                .resolve_tagged_transient_with::<dyn TestInterface, _>("test", 7)
                .unwrap()
                .a(),
            7
        );
        assert!(matches!(
            injector
                .resolve_tagged_transient_with::<dyn TestInterface, _>("test", "7")
                .err().unwrap(),
            InjectorError::ArgumentMismatch { .. }
        ));
    }
}
