//! 2차원 k-means (Lloyd 알고리즘, k-means++ 초기화)
//!
//! 같은 입력과 같은 시드는 항상 같은 결과를 만듭니다.
//!
//! - 초기 중심: `StdRng::seed_from_u64(seed)`로 구동되는 k-means++
//! - 할당: 가장 가까운 중심, 거리가 같으면 인덱스가 낮은 중심
//! - 갱신: 구성원 평균, 구성원이 없는 클러스터는 이전 중심 유지
//! - 종료: 할당이 바뀌지 않거나 최대 반복 횟수 도달

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AnalyzerError;

/// 특징 벡터
pub type Point = [f64; 2];

/// 클러스터링 결과
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// 각 포인트의 클러스터 인덱스
    pub labels: Vec<usize>,
    /// 최종 중심
    pub centroids: Vec<Point>,
    /// 수행한 할당 단계 수
    pub iterations: usize,
}

impl KMeansFit {
    /// 클러스터별 구성원 수
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// k-means 클러스터러
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
    seed: u64,
}

impl KMeans {
    pub fn new(k: usize, max_iterations: usize, seed: u64) -> Self {
        Self {
            k,
            max_iterations,
            seed,
        }
    }

    /// 포인트를 `k`개 클러스터로 분할합니다.
    ///
    /// 서로 다른 포인트 수가 `k`보다 적으면
    /// [`AnalyzerError::InsufficientDataForClustering`]을 반환합니다.
    pub fn fit(&self, points: &[Point]) -> Result<KMeansFit, AnalyzerError> {
        if self.k == 0 {
            return Err(AnalyzerError::Config {
                field: "cluster_count".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }

        let distinct = count_distinct(points);
        if distinct < self.k {
            return Err(AnalyzerError::InsufficientDataForClustering {
                points: distinct,
                clusters: self.k,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.init_centroids(points, &mut rng, distinct)?;
        let mut labels = vec![usize::MAX; points.len()];
        let mut iterations = 0;

        loop {
            let changed = assign(points, &centroids, &mut labels);
            iterations += 1;
            if !changed || iterations >= self.max_iterations.max(1) {
                break;
            }
            update_centroids(points, &labels, &mut centroids);
        }

        Ok(KMeansFit {
            labels,
            centroids,
            iterations,
        })
    }

    /// k-means++ 초기 중심 선택
    fn init_centroids(
        &self,
        points: &[Point],
        rng: &mut StdRng,
        distinct: usize,
    ) -> Result<Vec<Point>, AnalyzerError> {
        let mut centroids = Vec::with_capacity(self.k);
        centroids.push(points[rng.gen_range(0..points.len())]);

        while centroids.len() < self.k {
            let weights: Vec<f64> = points
                .iter()
                .map(|p| nearest(p, &centroids).1)
                .collect();
            let total: f64 = weights.iter().sum();
            let target = rng.r#gen::<f64>() * total;

            let mut acc = 0.0;
            let mut chosen = None;
            for (idx, &w) in weights.iter().enumerate() {
                if w <= 0.0 {
                    continue;
                }
                acc += w;
                chosen = Some(idx);
                if acc >= target {
                    break;
                }
            }

            // 거리가 0보다 큰 포인트가 없으면 더 고를 중심이 없음
            let Some(idx) = chosen else {
                return Err(AnalyzerError::InsufficientDataForClustering {
                    points: distinct,
                    clusters: self.k,
                });
            };
            centroids.push(points[idx]);
        }

        Ok(centroids)
    }
}

/// 서로 다른 포인트 수
pub fn count_distinct(points: &[Point]) -> usize {
    points
        .iter()
        .map(|p| (p[0].to_bits(), p[1].to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

fn squared_distance(a: &Point, b: &Point) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// 가장 가까운 중심의 (인덱스, 제곱 거리). 동률이면 낮은 인덱스.
fn nearest(point: &Point, centroids: &[Point]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (idx, c) in centroids.iter().enumerate() {
        let d = squared_distance(point, c);
        if d < best.1 {
            best = (idx, d);
        }
    }
    best
}

/// 할당 단계. 하나라도 바뀌면 true.
fn assign(points: &[Point], centroids: &[Point], labels: &mut [usize]) -> bool {
    let mut changed = false;
    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let (idx, _) = nearest(point, centroids);
        if *label != idx {
            *label = idx;
            changed = true;
        }
    }
    changed
}

fn update_centroids(points: &[Point], labels: &[usize], centroids: &mut [Point]) {
    let mut sums = vec![[0.0f64; 2]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];
    for (point, &label) in points.iter().zip(labels) {
        sums[label][0] += point[0];
        sums[label][1] += point[1];
        counts[label] += 1;
    }
    for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
        if count > 0 {
            *centroid = [sum[0] / count as f64, sum[1] / count as f64];
        }
    }
}
