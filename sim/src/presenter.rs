use pairs_core::*;

/// Presenter that narrates a round through the `log` facade.
#[derive(Clone, Debug)]
pub struct LogPresenter {
    catalog: Catalog,
    notices: usize,
}

impl LogPresenter {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            notices: 0,
        }
    }

    pub fn notices(&self) -> usize {
        self.notices
    }

    fn glyph(&self, face: CardFace) -> &str {
        match face.symbol() {
            Some(symbol) => self.catalog.glyph(symbol),
            None => CARD_BACK,
        }
    }
}

impl Presenter for LogPresenter {
    fn render_card(&mut self, index: usize, face: CardFace) {
        log::trace!("card {} -> {}", index, self.glyph(face));
    }

    fn render_timer(&mut self, remaining_time: Seconds) {
        log::trace!("time: {}", remaining_time);
    }

    fn render_moves(&mut self, moves: u32) {
        log::debug!("moves: {}", moves);
    }

    fn notify(&mut self, event: &RoundEvent) {
        self.notices += 1;
        match *event {
            RoundEvent::RoundStarted {
                round,
                pairs_needed,
            } => log::info!("round {} started, {} pairs to find", round, pairs_needed),
            RoundEvent::PairMatched { first, second } => {
                log::debug!("pair found at {} and {}", first, second)
            }
            RoundEvent::PairMismatch { first, second } => {
                log::debug!("no match at {} and {}", first, second)
            }
            RoundEvent::RoundWon {
                moves,
                remaining_time,
            } => log::info!(
                "you matched all pairs in {} moves, {}s to spare",
                moves,
                remaining_time
            ),
            RoundEvent::TimeExpired => log::info!("time's up"),
            _ => {}
        }
    }
}

/// Board faces as rows of glyphs, one line per board row.
pub fn render_board(board: &Board, catalog: &Catalog) -> String {
    board
        .layout()
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&face| match face {
                    CardFace::Hidden => CARD_BACK,
                    CardFace::Revealed(symbol) | CardFace::Matched(symbol) => {
                        catalog.glyph(symbol)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
