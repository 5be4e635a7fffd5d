use thiserror::Error;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {

    #[error("heap is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("heap is empty")]
    Empty

}


/// Array-backed binary min-heap with a capacity fixed at construction.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {

    items: Vec<T>,
    capacity: usize

}

impl<T> MinHeap<T>
where
    T: Ord
{

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity
        }
    }


    pub fn len(&self) -> usize {
        self.items.len()
    }


    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }


    pub const fn capacity(&self) -> usize {
        self.capacity
    }


    #[cfg(test)]
    fn peek(&self) -> Option<&T> {
        self.items.first()
    }


    pub fn add(&mut self, item: T) -> Result<(), HeapError> {

        if self.items.len() == self.capacity {
            return Err(HeapError::CapacityExceeded { capacity: self.capacity });
        }

        self.items.push(item);
        self.sift_up(self.items.len() - 1);

        Ok(())
    }


    pub fn remove(&mut self) -> Result<T, HeapError> {

        if self.items.is_empty() {
            return Err(HeapError::Empty);
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);

        let smallest = self.items.pop().ok_or(HeapError::Empty)?;
        self.sift_down(0);

        Ok(smallest)
    }


    fn sift_up(&mut self, mut index: usize) {

        while index > 0 {

            let parent = (index - 1) / 2;

            if self.items[index] < self.items[parent] {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }


    fn sift_down(&mut self, mut index: usize) {

        let len = self.items.len();

        loop {

            let left = 2 * index + 1;
            if left >= len {
                break;
            }

            // Equal children resolve to the left one
            let right = left + 1;
            let smaller_child = if right < len && self.items[right] < self.items[left] {
                right
            } else {
                left
            };

            if self.items[smaller_child] < self.items[index] {
                self.items.swap(index, smaller_child);
                index = smaller_child;
            } else {
                break;
            }
        }
    }

}
