use injector::component::{self, InjectablePtr};
use injector::injector::Injector;
use injector::instance_provider::TypedInstanceProvider;
use injector::Injectable;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

trait Connection: component::Injectable {
    fn describe(&self) -> String;
}

#[derive(Injectable)]
#[injectable(interfaces(Connection))]
struct TcpConnection {
    id: u32,
    host: String,
    port: u16,
}

impl Connection for TcpConnection {
    fn describe(&self) -> String {
        format!("#{} {}:{}", self.id, self.host, self.port)
    }
}

//noinspection DuplicatedCode
fn main() {
    let next_id = Arc::new(AtomicU32::new(1));

    let mut injector = Injector::new();

    // factories can accept arguments supplied at resolution time; multiple arguments are passed
    // as a tuple and need to match the registered type exactly
    injector
        .register_transient_factory_with::<dyn Connection, (String, u16), _>(
            move |(host, port)| {
                Box::new(TcpConnection {
                    id: next_id.fetch_add(1, Ordering::SeqCst),
                    host,
                    port,
                }) as InjectablePtr
            },
        )
        .expect("error registering Connection");

    for port in [80, 443] {
        let connection = injector
            .resolve_transient_with::<dyn Connection, _>(("localhost".to_string(), port))
            .expect("error creating Connection");

        // prints "#1 localhost:80" and "#2 localhost:443"
        println!("{}", connection.describe());
    }

    // wrong argument types are reported instead of silently picking another factory
    if let Err(error) = injector.resolve_transient_with::<dyn Connection, _>(80u16) {
        println!("{error}");
    }
}
