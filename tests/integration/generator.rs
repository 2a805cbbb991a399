//! Generator integration tests
//!
//! Pulls, iteration and cursors through the public API.

use coroutines::{CoError, CoResult, End, Generator};

fn range(n: i32) -> Generator<'static, i32> {
    Generator::new(move |co| async move {
        for i in 0..n {
            co.yield_(i).await;
        }
        Ok(())
    })
}

/// Splits `text` into words lazily.
fn words(text: &str) -> Generator<'_, &str> {
    Generator::new(move |co| async move {
        for word in text.split_whitespace() {
            co.yield_(word).await;
        }
        Ok(())
    })
}

#[test]
fn test_five_element_range() {
    let mut g = range(5);
    for i in 0..5 {
        assert_eq!(g.next_value().unwrap(), i);
    }
    assert!(matches!(g.next_value(), Err(CoError::Exhausted)));

    let fresh: CoResult<Vec<i32>> = range(5).iter().collect();
    assert_eq!(fresh.unwrap(), [0, 1, 2, 3, 4]);
}

#[test]
fn test_borrowed_input() {
    let text = String::from("the quick  brown fox");
    let collected: Vec<&str> = words(&text).into_iter().map(Result::unwrap).collect();
    assert_eq!(collected, ["the", "quick", "brown", "fox"]);
}

#[test]
fn test_cursor_range_loop() {
    let mut g = range(3);
    let mut cursor = g.cursor().unwrap();
    let mut seen = Vec::new();
    while cursor != End {
        seen.push(*cursor.current().unwrap());
        cursor.advance().unwrap();
    }
    assert_eq!(seen, [0, 1, 2]);
}

#[test]
fn test_generator_of_generators() {
    let mut outer = Generator::new(|co| async move {
        for n in 1..=3 {
            co.yield_(range(n)).await;
        }
        Ok(())
    });

    let mut lengths = Vec::new();
    while let Ok(inner) = outer.take_next() {
        lengths.push(inner.into_iter().count());
    }
    assert_eq!(lengths, [1, 2, 3]);
}

#[test]
fn test_fault_after_k_yields() {
    let mut g = Generator::new(|co| async move {
        co.yield_(10).await;
        co.yield_(20).await;
        anyhow::bail!("sensor unplugged");
    });

    assert_eq!(g.next_value().unwrap(), 10);
    assert_eq!(g.next_value().unwrap(), 20);
    let err = g.next_value().unwrap_err();
    assert_eq!(err.to_string(), "sensor unplugged");
    assert!(g.next_value().unwrap_err().is_exhausted());
}
