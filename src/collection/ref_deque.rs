use super::{object_for, RefIter};
use crate::pool::RefPool;
use std::collections::VecDeque;
use std::sync::Arc;

/// Double-ended queue of pool objects.
pub struct RefDeque<O> {
    pool: Arc<dyn RefPool<O>>,
    ids: VecDeque<i32>,
}

impl<O> RefDeque<O> {
    pub fn new(pool: Arc<dyn RefPool<O>>) -> Self {
        Self {
            pool,
            ids: VecDeque::new(),
        }
    }

    pub fn create_ref(&self) -> O {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, obj: O) {
        self.pool.release_ref(obj)
    }

    pub fn push_front(&mut self, obj: &O) {
        self.ids.push_front(self.pool.get_id(obj));
    }

    pub fn push_back(&mut self, obj: &O) {
        self.ids.push_back(self.pool.get_id(obj));
    }

    pub fn pop_front_into<'a>(&mut self, obj: &'a mut O) -> Option<&'a mut O> {
        let id = self.ids.pop_front()?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn pop_front(&mut self) -> Option<O> {
        let id = self.ids.pop_front()?;
        Some(object_for(self.pool.as_ref(), id))
    }

    pub fn pop_back_into<'a>(&mut self, obj: &'a mut O) -> Option<&'a mut O> {
        let id = self.ids.pop_back()?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn pop_back(&mut self) -> Option<O> {
        let id = self.ids.pop_back()?;
        Some(object_for(self.pool.as_ref(), id))
    }

    pub fn peek_front_into<'a>(&self, obj: &'a mut O) -> Option<&'a mut O> {
        let id = *self.ids.front()?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn peek_front(&self) -> Option<O> {
        self.ids.front().map(|&id| object_for(self.pool.as_ref(), id))
    }

    pub fn peek_back_into<'a>(&self, obj: &'a mut O) -> Option<&'a mut O> {
        let id = *self.ids.back()?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn peek_back(&self) -> Option<O> {
        self.ids.back().map(|&id| object_for(self.pool.as_ref(), id))
    }

    pub fn contains(&self, obj: &O) -> bool {
        self.ids.contains(&self.pool.get_id(obj))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Front to back.
    pub fn iter(&self) -> RefIter<'_, O, std::iter::Copied<std::collections::vec_deque::Iter<'_, i32>>> {
        RefIter::new(self.pool.as_ref(), self.ids.iter().copied())
    }
}

/// Last-in first-out stack of pool objects.
pub struct RefStack<O> {
    pool: Arc<dyn RefPool<O>>,
    ids: Vec<i32>,
}

impl<O> RefStack<O> {
    pub fn new(pool: Arc<dyn RefPool<O>>) -> Self {
        Self {
            pool,
            ids: Vec::new(),
        }
    }

    pub fn create_ref(&self) -> O {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, obj: O) {
        self.pool.release_ref(obj)
    }

    pub fn push(&mut self, obj: &O) {
        self.ids.push(self.pool.get_id(obj));
    }

    pub fn pop_into<'a>(&mut self, obj: &'a mut O) -> Option<&'a mut O> {
        let id = self.ids.pop()?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn pop(&mut self) -> Option<O> {
        let id = self.ids.pop()?;
        Some(object_for(self.pool.as_ref(), id))
    }

    pub fn peek_into<'a>(&self, obj: &'a mut O) -> Option<&'a mut O> {
        let id = *self.ids.last()?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn peek(&self) -> Option<O> {
        self.ids.last().map(|&id| object_for(self.pool.as_ref(), id))
    }

    pub fn contains(&self, obj: &O) -> bool {
        self.ids.contains(&self.pool.get_id(obj))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Top to bottom.
    pub fn iter(&self) -> RefIter<'_, O, std::iter::Copied<std::iter::Rev<std::slice::Iter<'_, i32>>>> {
        RefIter::new(self.pool.as_ref(), self.ids.iter().rev().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexPool;
    use crate::model::SimpleVertex;

    fn labelled(pool: &VertexPool<SimpleVertex>, n: i32) -> Vec<SimpleVertex> {
        (0..n)
            .map(|i| {
                let v = pool.create();
                v.set_label(i);
                v
            })
            .collect()
    }

    #[test]
    fn test_deque_both_ends() {
        let pool = Arc::new(VertexPool::<SimpleVertex>::new(4));
        let v = labelled(&pool, 3);
        let mut deque = RefDeque::new(pool.clone());
        deque.push_back(&v[1]);
        deque.push_front(&v[0]);
        deque.push_back(&v[2]);

        assert_eq!(deque.len(), 3);
        assert_eq!(deque.peek_front().map(|x| x.label()), Some(0));
        assert_eq!(deque.peek_back().map(|x| x.label()), Some(2));

        let mut cursor = pool.create_ref();
        assert_eq!(deque.pop_back_into(&mut cursor).map(|x| x.label()), Some(2));
        assert_eq!(deque.pop_front_into(&mut cursor).map(|x| x.label()), Some(0));
        assert!(deque.contains(&v[1]));
        assert_eq!(deque.pop_front(), Some(v[1].clone()));
        assert!(deque.pop_back().is_none());
        assert!(deque.peek_front_into(&mut cursor).is_none());
    }

    #[test]
    fn test_stack_lifo() {
        let pool = Arc::new(VertexPool::<SimpleVertex>::new(4));
        let v = labelled(&pool, 3);
        let mut stack = RefStack::new(pool.clone());
        for vertex in &v {
            stack.push(vertex);
        }
        let order: Vec<i32> = stack.iter().map(|x| x.label()).collect();
        assert_eq!(order, vec![2, 1, 0]);

        let mut cursor = pool.create_ref();
        assert_eq!(stack.peek_into(&mut cursor).map(|x| x.label()), Some(2));
        assert_eq!(stack.pop().map(|x| x.label()), Some(2));
        assert_eq!(stack.pop_into(&mut cursor).map(|x| x.label()), Some(1));
        assert_eq!(stack.peek(), Some(v[0].clone()));
        assert_eq!(stack.len(), 1);
    }
}
