use std::sync::{Arc, Mutex};
use std::thread;

use interpose::{BoxedHandler, BoxedMiddleware, Chain, Next, chain, from_fn, handler};

type Log = Arc<Mutex<Vec<String>>>;

fn push(log: &Log, entry: impl Into<String>) {
    log.lock().unwrap().push(entry.into());
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Logs `<name>-before` and `<name>-after` around `next`.
fn around(log: &Log, name: &'static str) -> BoxedMiddleware<String, String, String> {
    let log = Arc::clone(log);
    chain::boxed(from_fn(move |req: String, next| {
        push(&log, format!("{name}-before"));
        let res = next.run(req);
        push(&log, format!("{name}-after"));
        res
    }))
}

fn terminal(log: &Log) -> BoxedHandler<String, String, String> {
    let log = Arc::clone(log);
    handler::boxed(move |req: String| {
        push(&log, "terminal");
        Ok(req)
    })
}

#[test]
fn before_and_after_nest_around_the_terminal() {
    let log = Log::default();
    let app = chain([around(&log, "M1"), around(&log, "M2")], terminal(&log));

    assert_eq!(app.call("x".to_owned()), Ok("x".to_owned()));
    assert_eq!(
        entries(&log),
        ["M1-before", "M2-before", "terminal", "M2-after", "M1-after"]
    );
}

#[test]
fn units_run_in_sequence_order() {
    let log = Log::default();
    let names = ["a", "b", "c", "d", "e", "f", "g"];
    let units = names.iter().map(|&name| {
        let log = Arc::clone(&log);
        chain::boxed(from_fn(move |req: String, next| {
            push(&log, name);
            next.run(req)
        }))
    });

    let app = chain(units, terminal(&log));
    app.call(String::new()).unwrap();

    let mut expected: Vec<&str> = names.to_vec();
    expected.push("terminal");
    assert_eq!(entries(&log), expected);
}

#[derive(Debug, PartialEq)]
struct Call {
    token: String,
    body: String,
}

#[derive(Debug, PartialEq)]
enum Failure {
    Unauthorized,
    Downstream(String),
}

#[test]
fn failed_auth_skips_everything_downstream() {
    let log = Log::default();

    let auth = from_fn(|req: Call, next: Next<'_, Call, String, Failure>| {
        if req.token != "secret" {
            return Err(Failure::Unauthorized);
        }
        next.run(req)
    });
    let logger = {
        let log = Arc::clone(&log);
        from_fn(move |req: Call, next: Next<'_, Call, String, Failure>| {
            push(&log, "log");
            next.run(req)
        })
    };
    let reached = Arc::clone(&log);
    let app = Chain::builder()
        .with(auth)
        .with(logger)
        .handler(move |req: Call| {
            push(&reached, "terminal");
            if req.body == "boom" {
                return Err(Failure::Downstream(req.body));
            }
            Ok(req.body)
        });

    let denied = app.call(Call { token: "guess".into(), body: "hi".into() });
    assert_eq!(denied, Err(Failure::Unauthorized));
    assert!(entries(&log).is_empty());

    let allowed = app.call(Call { token: "secret".into(), body: "hi".into() });
    assert_eq!(allowed, Ok("hi".to_owned()));
    assert_eq!(entries(&log), ["log", "terminal"]);

    let failed = app.call(Call { token: "secret".into(), body: "boom".into() });
    assert_eq!(failed, Err(Failure::Downstream("boom".to_owned())));
    assert_eq!(entries(&log), ["log", "terminal", "log", "terminal"]);
}

#[test]
fn outer_units_see_and_may_rewrite_a_short_circuit() {
    let log = Log::default();
    let outer = {
        let log = Arc::clone(&log);
        chain::boxed(from_fn(move |req: u32, next: Next<'_, u32, u32, String>| {
            let res = next.run(req);
            push(&log, format!("outer saw {res:?}"));
            res.map_err(|e| format!("wrapped: {e}"))
        }))
    };
    let stop = chain::boxed(from_fn(|_: u32, _: Next<'_, u32, u32, String>| Err("stop".to_owned())));
    let never = {
        let log = Arc::clone(&log);
        chain::boxed(from_fn(move |req: u32, next: Next<'_, u32, u32, String>| {
            push(&log, "never");
            next.run(req)
        }))
    };
    let base = {
        let log = Arc::clone(&log);
        handler::boxed(move |req: u32| {
            push(&log, "terminal");
            Ok::<_, String>(req)
        })
    };

    let app = chain([outer, stop, never], base);
    assert_eq!(app.call(1), Err("wrapped: stop".to_owned()));
    assert_eq!(entries(&log), [r#"outer saw Err("stop")"#]);
}

#[test]
fn empty_sequence_behaves_like_the_terminal() {
    let echo = handler::boxed(|req: String| Ok::<_, ()>(req));
    let app = chain(Vec::new(), Arc::clone(&echo));

    assert_eq!(app.call("hello".to_owned()), Ok("hello".to_owned()));
    assert_eq!(app.call("hello".to_owned()), echo.call("hello".to_owned()));
}

#[test]
fn fallback_replaces_an_inner_failure() {
    let fallback = chain::boxed(from_fn(|req: u32, next: Next<'_, u32, String, String>| {
        match next.run(req) {
            Ok(res) => Ok(res),
            Err(_) => Ok("fallback".to_owned()),
        }
    }));
    let failing = handler::boxed(|_: u32| Err::<String, _>("db down".to_owned()));

    let app = chain([fallback], failing);
    assert_eq!(app.call(3), Ok("fallback".to_owned()));
}

#[test]
fn success_may_be_turned_into_an_error() {
    let veto = chain::boxed(from_fn(|req: u32, next: Next<'_, u32, u32, String>| {
        let res = next.run(req)?;
        if res > 10 { Err(format!("{res} too large")) } else { Ok(res) }
    }));
    let app = chain([veto], handler::boxed(|req: u32| Ok(req * 2)));

    assert_eq!(app.call(3), Ok(6));
    assert_eq!(app.call(6), Err("12 too large".to_owned()));
}

#[test]
fn building_twice_gives_independent_equivalent_chains() {
    let first_log = Log::default();
    let second_log = Log::default();

    let first = chain([around(&first_log, "M")], terminal(&first_log));
    let second = chain([around(&second_log, "M")], terminal(&second_log));

    assert_eq!(first.call("a".to_owned()), second.call("a".to_owned()));
    assert_eq!(entries(&first_log), entries(&second_log));

    first.call("b".to_owned()).unwrap();
    assert_eq!(entries(&first_log).len(), 6);
    assert_eq!(entries(&second_log).len(), 3);
}

#[test]
fn one_chain_serves_many_threads() {
    let app = chain(
        [chain::boxed(from_fn(|req: u64, next: Next<'_, u64, u64, ()>| next.run(req + 1)))],
        handler::boxed(|req: u64| Ok(req * 2)),
    );

    let workers: Vec<_> = (0..8u64)
        .map(|i| {
            let app = Arc::clone(&app);
            thread::spawn(move || app.call(i))
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        assert_eq!(worker.join().unwrap(), Ok((i as u64 + 1) * 2));
    }
}

#[test]
fn chains_nest_as_handlers() {
    let log = Log::default();
    let inner = chain([around(&log, "inner")], terminal(&log));
    let outer = chain([around(&log, "outer")], inner);

    outer.call("x".to_owned()).unwrap();
    assert_eq!(
        entries(&log),
        ["outer-before", "inner-before", "terminal", "inner-after", "outer-after"]
    );
}
