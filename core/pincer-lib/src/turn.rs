//! turn.rs：
//! - 回合控制器：同一時間只有一個行動中的單位，倒數計時結束或放開時鎖定回合。
//! - 狀態轉移：Idle → Active(unit) → Locked → Idle（下一輪）。
//! - 只管理狀態與倒數，不碰棋盤；位置回復與夾擊判定由 Battle 負責。
use crate::*;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TurnPhase {
    #[default]
    Idle,
    Active(UnitID),
    Locked,
}

/// 倒數計時，鎖定時整個丟棄，之後的 tick 都不會有作用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub remaining_ms: Millis,
    pub paused: bool,
}

/// 對外呈現的回合狀態
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub active_unit_id: Option<UnitID>,
    pub remaining_ms: Millis,
    pub locked: bool,
}

#[derive(Debug, Clone)]
pub struct TurnController {
    phase: TurnPhase,
    countdown: Option<Countdown>,
    duration_ms: Millis,
    tick_ms: Millis,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new(&RulesConfig::default())
    }
}

impl TurnController {
    /// 未經 validate 的設定：tick 間隔至少 1ms，倒數至少一個 tick，保證時間一定會到
    pub fn new(config: &RulesConfig) -> Self {
        let tick_ms = config.tick_ms.max(1);
        TurnController {
            phase: TurnPhase::Idle,
            countdown: None,
            duration_ms: config.turn_duration_ms.max(tick_ms),
            tick_ms,
        }
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn active_unit(&self) -> Option<&UnitID> {
        match &self.phase {
            TurnPhase::Active(unit_id) => Some(unit_id),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.phase == TurnPhase::Locked
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }

    /// Idle → Active，開始倒數
    pub fn begin(&mut self, unit_id: &str) -> Result<(), Error> {
        let func = "TurnController::begin";

        match &self.phase {
            TurnPhase::Idle => {
                self.phase = TurnPhase::Active(unit_id.to_string());
                self.countdown = Some(Countdown {
                    remaining_ms: self.duration_ms,
                    paused: false,
                });
                Ok(())
            }
            TurnPhase::Active(active) => Err(Error::TurnInProgress {
                func,
                unit_id: active.clone(),
            }),
            TurnPhase::Locked => Err(Error::TurnLocked { func }),
        }
    }

    /// 推進一個 tick，回傳倒數是否在這次歸零
    pub fn tick(&mut self) -> bool {
        let Some(countdown) = self.countdown.as_mut() else {
            return false;
        };
        if countdown.paused || countdown.remaining_ms == 0 {
            return false;
        }
        countdown.remaining_ms = countdown.remaining_ms.saturating_sub(self.tick_ms);
        countdown.remaining_ms == 0
    }

    pub fn pause(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.paused = false;
        }
    }

    /// Active → Locked，丟棄倒數；回傳原本行動中的單位
    pub fn lock(&mut self) -> Result<UnitID, Error> {
        let func = "TurnController::lock";

        match std::mem::take(&mut self.phase) {
            TurnPhase::Active(unit_id) => {
                self.phase = TurnPhase::Locked;
                self.countdown = None;
                Ok(unit_id)
            }
            other => {
                let err = match other {
                    TurnPhase::Locked => Error::TurnLocked { func },
                    _ => Error::NoActiveUnit { func },
                };
                self.phase = other;
                Err(err)
            }
        }
    }

    /// Locked → Idle；已經是 Idle 時不做事並回傳 false，行動中則拒絕
    pub fn reset(&mut self) -> Result<bool, Error> {
        let func = "TurnController::reset";

        match &self.phase {
            TurnPhase::Idle => Ok(false),
            TurnPhase::Active(unit_id) => Err(Error::TurnInProgress {
                func,
                unit_id: unit_id.clone(),
            }),
            TurnPhase::Locked => {
                self.phase = TurnPhase::Idle;
                self.countdown = None;
                Ok(true)
            }
        }
    }

    pub fn state(&self) -> TurnState {
        let remaining_ms = match (&self.phase, self.countdown) {
            (TurnPhase::Active(_), Some(countdown)) => countdown.remaining_ms,
            (TurnPhase::Idle, _) => self.duration_ms,
            _ => 0,
        };
        TurnState {
            active_unit_id: self.active_unit().cloned(),
            remaining_ms,
            locked: self.is_locked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut turn = TurnController::default();
        assert_eq!(turn.state().remaining_ms, 4000);

        turn.begin("p1").unwrap();
        assert!(matches!(
            turn.begin("p2"),
            Err(Error::TurnInProgress { .. })
        ));
        for _ in 0..399 {
            assert!(!turn.tick());
        }
        assert_eq!(turn.state().remaining_ms, 10);
        assert!(turn.tick());

        assert_eq!(turn.lock().unwrap(), "p1");
        assert!(turn.is_locked());
        assert!(!turn.tick());
        assert!(matches!(turn.begin("p2"), Err(Error::TurnLocked { .. })));
        assert!(matches!(turn.lock(), Err(Error::TurnLocked { .. })));

        assert!(turn.reset().unwrap());
        assert_eq!(*turn.phase(), TurnPhase::Idle);
        assert!(!turn.reset().unwrap());
    }

    #[test]
    fn test_pause_preserves_remaining() {
        let mut turn = TurnController::default();
        turn.begin("p1").unwrap();
        for _ in 0..100 {
            turn.tick();
        }
        turn.pause();
        for _ in 0..1000 {
            assert!(!turn.tick());
        }
        assert_eq!(turn.state().remaining_ms, 3000);
        turn.resume();
        turn.tick();
        assert_eq!(turn.state().remaining_ms, 2990);
    }

    #[test]
    fn test_reset_rejected_while_active() {
        let mut turn = TurnController::default();
        assert!(matches!(turn.lock(), Err(Error::NoActiveUnit { .. })));
        turn.begin("p1").unwrap();
        assert!(turn.reset().is_err());
        assert_eq!(turn.active_unit().map(String::as_str), Some("p1"));
    }

    #[test]
    fn test_custom_duration() {
        let config = RulesConfig {
            turn_duration_ms: 25,
            tick_ms: 10,
            ..Default::default()
        };
        let mut turn = TurnController::new(&config);
        turn.begin("p1").unwrap();
        assert!(!turn.tick());
        assert!(!turn.tick());
        assert!(turn.tick());
        assert!(!turn.tick());
    }

    #[test]
    fn test_zero_duration_expires_on_first_tick() {
        let config = RulesConfig {
            turn_duration_ms: 0,
            tick_ms: 0,
            ..Default::default()
        };
        let mut turn = TurnController::new(&config);
        turn.begin("p1").unwrap();
        assert!(turn.tick());
        assert_eq!(turn.state().remaining_ms, 0);
    }
}
