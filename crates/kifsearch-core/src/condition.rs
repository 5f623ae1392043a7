//! 検索条件（マス番号＋駒コード）のシリアライズ

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{PieceToken, Placement};
use crate::error::ConditionError;
use crate::types::{PieceCode, Square};

/// 「このマスにこの駒がある」という1つの条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchCondition {
    pub square: Square,
    pub code: PieceCode,
}

/// 検索 API に送る条件の JSON 表現
///
/// `c` は 1〜81 のマス番号を10進文字列で持つ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConditionJson {
    pub c: String,
    pub sfen: String,
}

impl SearchCondition {
    pub fn new(square: Square, code: PieceCode) -> Self {
        Self { square, code }
    }

    pub fn to_json(&self) -> ConditionJson {
        ConditionJson {
            c: self.square.index().to_string(),
            sfen: self.code.to_string(),
        }
    }
}

impl TryFrom<&ConditionJson> for SearchCondition {
    type Error = ConditionError;

    fn try_from(json: &ConditionJson) -> Result<Self, Self::Error> {
        let square = json
            .c
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Square::from_index)
            .ok_or_else(|| ConditionError::InvalidIndex(json.c.clone()))?;
        let code = json.sfen.parse::<PieceCode>()?;
        Ok(Self { square, code })
    }
}

impl FromStr for SearchCondition {
    type Err = ConditionError;

    /// `XY:CODE` 形式（筋・段の2桁＋駒コード。例: `76:P`、`22:b`）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConditionError::InvalidPlacement(s.to_string());
        let (coord, code) = s.split_once(':').ok_or_else(invalid)?;
        let mut digits = coord.trim().chars().map(|c| c.to_digit(10));
        let square = match (digits.next(), digits.next(), digits.next()) {
            (Some(Some(x)), Some(Some(y)), None) => Square::from_display(x as u8, y as u8),
            _ => None,
        }
        .ok_or_else(invalid)?;
        let code = code.trim().parse::<PieceCode>()?;
        Ok(Self { square, code })
    }
}

/// 配置を条件列に変換する。順序はマス番号順。
pub fn serialize_conditions(placement: &Placement) -> Vec<SearchCondition> {
    placement
        .iter()
        .map(|(square, token)| SearchCondition::new(square, token.code))
        .collect()
}

/// 条件列をリクエストボディ用の JSON 配列にする
pub fn conditions_to_json(conditions: &[SearchCondition]) -> Vec<ConditionJson> {
    conditions.iter().map(SearchCondition::to_json).collect()
}

/// JSON 表現から条件列に戻す
pub fn decode_conditions(items: &[ConditionJson]) -> Result<Vec<SearchCondition>, ConditionError> {
    items.iter().map(SearchCondition::try_from).collect()
}

/// JSON 文字列（リクエストボディと同じ形式）から条件列を読む
pub fn parse_conditions_json(text: &str) -> Result<Vec<SearchCondition>, ConditionError> {
    let items: Vec<ConditionJson> =
        serde_json::from_str(text).map_err(|e| ConditionError::Json(e.to_string()))?;
    decode_conditions(&items)
}

/// 条件列を配置に戻す（同じマスの条件は後勝ち）
pub fn conditions_to_placement(conditions: &[SearchCondition]) -> Placement {
    let mut placement = Placement::new();
    for cond in conditions {
        placement.place(cond.square, PieceToken::upright_for(cond.code));
    }
    placement
}
