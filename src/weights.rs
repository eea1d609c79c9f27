/// Positional weights for the two ISBN check-digit schemes.
///
/// ISBN-10 counts down from 10 to 1; EAN-13 alternates 1 and 3 forever.
#[derive(Copy, Clone, Debug)]
pub enum Weights {
    Descending(i32),
    Alternating(u8),
}

impl Weights {
    pub fn isbn10() -> Self {
        Weights::Descending(10)
    }

    pub fn ean13() -> Self {
        Weights::Alternating(0)
    }
}

impl Iterator for Weights {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Weights::Descending(0) => None,
            Weights::Descending(weight) => {
                let current = *weight;
                *weight -= 1;
                Some(current)
            }

            Weights::Alternating(state) => match *state {
                0 => {
                    *state = 1;
                    Some(1)
                }

                _ => {
                    *state = 0;
                    Some(3)
                }
            },
        }
    }
}
